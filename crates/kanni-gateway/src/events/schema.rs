use serde::Deserialize;

/// Session user as reported by the auth provider. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserIdentity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.is_empty())
}

impl UserIdentity {
    pub fn id(&self) -> &str {
        non_empty(&self.id).unwrap_or("anonymous")
    }

    pub fn email(&self) -> &str {
        non_empty(&self.email).unwrap_or("anonymous")
    }

    /// Full name, then name, then the email local part.
    pub fn display_name(&self) -> &str {
        non_empty(&self.user_metadata.full_name)
            .or_else(|| non_empty(&self.user_metadata.name))
            .or_else(|| self.email().split('@').next().filter(|s| !s.is_empty()))
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterestRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    PageView {
        page: String,
        #[serde(default)]
        url: Option<String>,
    },
    UserLogin {
        #[serde(default)]
        user: UserIdentity,
        #[serde(default)]
        method: Option<String>,
    },
    UserLogout {
        #[serde(default)]
        user: UserIdentity,
    },
    InterestCreated {
        #[serde(default)]
        user: UserIdentity,
        interest: InterestRef,
    },
    InterestDeleted {
        #[serde(default)]
        user: UserIdentity,
        interest_id: String,
    },
    TipGenerated {
        #[serde(default)]
        user: UserIdentity,
        interest_id: String,
        tip_length: usize,
    },
    AppError {
        #[serde(default)]
        context: Option<String>,
        message: String,
    },
    /// An outbound call made by the browser; status 0 means no response.
    HttpRequest {
        method: String,
        url: String,
        status: u16,
        duration_ms: f64,
    },
    /// Latency the browser measured for one of its own endpoints.
    ResponseTime {
        endpoint: String,
        duration_ms: f64,
    },
    BackendStatus {
        connected: bool,
        duration_ms: f64,
    },
}

impl ClientEvent {
    /// Value of the `event.type` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientEvent::PageView { .. } => "page_view",
            ClientEvent::UserLogin { .. } => "user_login",
            ClientEvent::UserLogout { .. } => "user_logout",
            ClientEvent::InterestCreated { .. } => "interest_created",
            ClientEvent::InterestDeleted { .. } => "interest_deleted",
            ClientEvent::TipGenerated { .. } => "tip_generated",
            ClientEvent::AppError { .. } => "application_error",
            ClientEvent::HttpRequest { .. } => "http_request",
            ClientEvent::ResponseTime { .. } => "response_time",
            ClientEvent::BackendStatus { .. } => "backend_status",
        }
    }
}
