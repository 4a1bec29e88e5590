//! UI Bridge Module
//!
//! Defines the communication protocol between a front-end and the
//! controller task running on the Tokio runtime.

use std::time::Duration;

use courier_domain::{HttpMethod, NormalizedResponse, Tab, TabEdit, TabField, TabId};

/// Which tab a command applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabRef {
    /// Whatever tab is active when the command is handled.
    #[default]
    Active,
    /// A specific tab.
    Id(TabId),
}

/// Commands sent from the front-end to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// User clicked new tab button.
    NewTabClicked,

    /// User clicked on a tab.
    TabClicked { id: TabId },

    /// User clicked close on a tab.
    TabCloseClicked { id: TabId },

    /// User edited one request field.
    FieldChanged { target: TabRef, edit: TabEdit },

    /// User toggled the bearer token field.
    ToggleBearerTokenInput { target: TabRef },

    /// User clicked Send.
    SendRequest { target: TabRef },

    /// Export the request as a cURL command.
    ExportAsCurl { target: TabRef },

    /// Show the full tab, fields and response.
    ShowTab { target: TabRef },

    /// Re-publish the tab list.
    ListTabs,
}

/// Tab summary for the tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabData {
    pub id: TabId,
    pub name: String,
    pub method: HttpMethod,
    pub active: bool,
    pub has_response: bool,
}

impl TabData {
    /// Summarizes a tab.
    #[must_use]
    pub fn from_tab(tab: &Tab, active: TabId) -> Self {
        let name = if tab.request.url_is_blank() {
            "New Request".to_string()
        } else {
            tab.request.url.trim().to_string()
        };
        Self {
            id: tab.id(),
            name,
            method: tab.request.method,
            active: tab.id() == active,
            has_response: tab.has_response(),
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A one-off message for the user, not tied to tab state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Creates an informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Updates sent from the controller to the front-end.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Update the list of open tabs.
    TabsUpdated(Vec<TabData>),

    /// Update the active tab ID.
    ActiveTabChanged(TabId),

    /// A request field was replaced.
    FieldUpdated { id: TabId, field: TabField },

    /// The bearer token field was shown or hidden.
    BearerInputToggled { id: TabId, visible: bool },

    /// Full tab contents, sent in answer to `ShowTab`.
    TabDetails(Box<Tab>),

    /// A request left for the network.
    RequestPending {
        id: TabId,
        method: HttpMethod,
        url: String,
    },

    /// A response was stored in its tab.
    ResponseReady {
        id: TabId,
        response: Box<NormalizedResponse>,
        elapsed: Duration,
    },

    /// A response arrived after a newer send from the same tab and was dropped.
    ResponseSuperseded { id: TabId },

    /// cURL command for a tab.
    CurlExport { id: TabId, command: String },

    /// Show a message.
    Notice(Notice),
}
