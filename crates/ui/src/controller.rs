//! The controller task.
//!
//! Owns the tab store and is its only writer. Commands are handled one at a
//! time; each send runs on its own task and reports back on a completion
//! channel, so a slow request never blocks editing other tabs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use courier_application::ports::HttpClient;
use courier_application::{PreparedSend, SendRequest};
use courier_domain::{
    DomainError, NormalizedResponse, OutboundRequest, SendOutcome, SendTicket, TabId, TabStore,
};
use courier_infrastructure::generate_curl;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bridge::{Notice, TabData, TabRef, UiCommand, UiUpdate};

/// Result of one dispatched send, reported back to the controller.
#[derive(Debug)]
struct SendCompletion {
    ticket: SendTicket,
    response: NormalizedResponse,
    elapsed: Duration,
}

/// Channels to a running controller.
pub struct ControllerHandle {
    /// Command input. Dropping every sender stops the controller.
    pub commands: mpsc::UnboundedSender<UiCommand>,
    /// Update output.
    pub updates: mpsc::UnboundedReceiver<UiUpdate>,
    /// The controller task.
    pub task: JoinHandle<()>,
}

/// Applies `UiCommand`s to the tab store and publishes `UiUpdate`s.
pub struct Controller<C: HttpClient + 'static> {
    store: TabStore,
    send_request: Arc<SendRequest<C>>,
    update_tx: mpsc::UnboundedSender<UiUpdate>,
    in_flight: usize,
}

impl<C: HttpClient + 'static> Controller<C> {
    /// Creates a controller with a fresh store.
    pub fn new(client: Arc<C>, update_tx: mpsc::UnboundedSender<UiUpdate>) -> Self {
        Self {
            store: TabStore::new(),
            send_request: Arc::new(SendRequest::new(client)),
            update_tx,
            in_flight: 0,
        }
    }

    /// Spawns a controller on the current runtime and returns its channels.
    pub fn spawn(client: Arc<C>) -> ControllerHandle {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();
        let (update_tx, update_rx) = mpsc::unbounded_channel::<UiUpdate>();

        let controller = Self::new(client, update_tx);
        let task = tokio::spawn(controller.run(cmd_rx));

        ControllerHandle {
            commands: cmd_tx,
            updates: update_rx,
            task,
        }
    }

    /// Processes commands until the command channel closes.
    ///
    /// Publishes the initial tab list before reading the first command.
    /// Sends still in flight when the channel closes are completed and
    /// their updates published before the controller returns.
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<UiCommand>) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<SendCompletion>();

        self.publish_tabs();
        self.emit(UiUpdate::ActiveTabChanged(self.store.active_tab_id()));

        let mut accepting = true;
        while accepting || self.in_flight > 0 {
            tokio::select! {
                command = cmd_rx.recv(), if accepting => match command {
                    Some(command) => self.handle_command(command, &done_tx),
                    None => {
                        accepting = false;
                        debug!(in_flight = self.in_flight, "command channel closed");
                    }
                },
                Some(done) = done_rx.recv() => self.handle_completion(done),
            }
        }

        info!("controller stopped");
    }

    fn handle_command(
        &mut self,
        command: UiCommand,
        done_tx: &mpsc::UnboundedSender<SendCompletion>,
    ) {
        match command {
            UiCommand::NewTabClicked => {
                let id = self.store.create_tab();
                debug!(tab = %id, "tab created");
                self.publish_tabs();
                self.emit(UiUpdate::ActiveTabChanged(id));
            }
            UiCommand::TabClicked { id } => match self.store.select_tab(id) {
                Ok(()) => {
                    self.publish_tabs();
                    self.emit(UiUpdate::ActiveTabChanged(id));
                }
                Err(e) => self.reject(&e),
            },
            UiCommand::TabCloseClicked { id } => match self.store.close_tab(id) {
                Ok(_) => {
                    debug!(tab = %id, "tab closed");
                    self.publish_tabs();
                    self.emit(UiUpdate::ActiveTabChanged(self.store.active_tab_id()));
                    self.emit(UiUpdate::Notice(Notice::info(format!("Closed tab {id}"))));
                }
                Err(e) => self.reject(&e),
            },
            UiCommand::FieldChanged { target, edit } => {
                let id = self.resolve(target);
                let field = edit.field();
                if self.store.update_field(id, edit) {
                    self.emit(UiUpdate::FieldUpdated { id, field });
                } else {
                    self.reject(&DomainError::TabNotFound(id));
                }
            }
            UiCommand::ToggleBearerTokenInput { target } => {
                let id = self.resolve(target);
                match self.store.toggle_bearer_input(id) {
                    Some(visible) => self.emit(UiUpdate::BearerInputToggled { id, visible }),
                    None => self.reject(&DomainError::TabNotFound(id)),
                }
            }
            UiCommand::SendRequest { target } => {
                let id = self.resolve(target);
                self.start_send(id, done_tx);
            }
            UiCommand::ExportAsCurl { target } => {
                let id = self.resolve(target);
                self.export_curl(id);
            }
            UiCommand::ShowTab { target } => {
                let id = self.resolve(target);
                match self.store.tab(id) {
                    Some(tab) => self.emit(UiUpdate::TabDetails(Box::new(tab.clone()))),
                    None => self.reject(&DomainError::TabNotFound(id)),
                }
            }
            UiCommand::ListTabs => self.publish_tabs(),
        }
    }

    /// Validates the tab, tags the send and dispatches it on its own task.
    fn start_send(&mut self, id: TabId, done_tx: &mpsc::UnboundedSender<SendCompletion>) {
        let Some(tab) = self.store.tab(id) else {
            self.reject(&DomainError::TabNotFound(id));
            return;
        };

        let prepared = match PreparedSend::from_tab(tab) {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!(tab = %id, error = %e, "send refused");
                self.emit(UiUpdate::Notice(Notice::error(e.to_string())));
                return;
            }
        };

        let Some(ticket) = self.store.begin_send(id) else {
            return;
        };

        self.emit(UiUpdate::RequestPending {
            id,
            method: prepared.draft().method,
            url: prepared.draft().url.clone(),
        });

        let send_request = Arc::clone(&self.send_request);
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let response = send_request.dispatch(prepared).await;
            let _ = done_tx.send(SendCompletion {
                ticket,
                response,
                elapsed: started.elapsed(),
            });
        });
        self.in_flight += 1;
    }

    fn handle_completion(&mut self, done: SendCompletion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        let SendCompletion {
            ticket,
            response,
            elapsed,
        } = done;
        let id = ticket.tab_id;

        match self.store.complete_send(ticket, response.clone()) {
            SendOutcome::Committed => {
                info!(
                    tab = %id,
                    status = ?response.status(),
                    elapsed_ms = elapsed.as_millis(),
                    "response stored"
                );
                self.emit(UiUpdate::ResponseReady {
                    id,
                    response: Box::new(response),
                    elapsed,
                });
                self.publish_tabs();
            }
            SendOutcome::Superseded => {
                warn!(tab = %id, sequence = ticket.sequence, "stale response discarded");
                self.emit(UiUpdate::ResponseSuperseded { id });
            }
            SendOutcome::TabClosed => {
                debug!(tab = %id, "response for closed tab discarded");
            }
        }
    }

    fn export_curl(&self, id: TabId) {
        let Some(tab) = self.store.tab(id) else {
            self.reject(&DomainError::TabNotFound(id));
            return;
        };
        match OutboundRequest::from_draft(&tab.request) {
            Ok(request) => self.emit(UiUpdate::CurlExport {
                id,
                command: generate_curl(&request),
            }),
            Err(e) => self.emit(UiUpdate::Notice(Notice::error(e.to_string()))),
        }
    }

    const fn resolve(&self, target: TabRef) -> TabId {
        match target {
            TabRef::Active => self.store.active_tab_id(),
            TabRef::Id(id) => id,
        }
    }

    fn publish_tabs(&self) {
        let active = self.store.active_tab_id();
        let tabs = self
            .store
            .tabs()
            .iter()
            .map(|tab| TabData::from_tab(tab, active))
            .collect();
        self.emit(UiUpdate::TabsUpdated(tabs));
    }

    fn reject(&self, error: &DomainError) {
        warn!(error = %error, "command rejected");
        self.emit(UiUpdate::Notice(Notice::error(error.to_string())));
    }

    fn emit(&self, update: UiUpdate) {
        let _ = self.update_tx.send(update);
    }
}
