//! Process startup: pick a domain, build its server, serve it over stdio.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use relo_api::{ApiError, RelocationClient};
use relo_types::DomainKind;
use relo_widgets::Presenter;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, ServerConfig, load_config, load_config_from_path};
use crate::server::{DomainServer, StdioError, ToolContext};

/// Where a [`Launcher`] is in the startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Uninitialized,
    SelectingDomain,
    Constructing(DomainKind),
    Serving(DomainKind),
    Failed,
}

/// Fatal startup failures. All of them end the process with status 1.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("missing domain selector; valid selectors: {}", DomainKind::selectors())]
    MissingSelector,

    #[error("invalid domain selector '{selector}'; valid selectors: {valid}")]
    InvalidSelector { selector: String, valid: String },

    #[error("a domain has already been selected for this process")]
    AlreadySelected,

    #[error("cannot {action} while {state:?}")]
    OutOfOrder { action: &'static str, state: LaunchState },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ApiError),

    #[error(transparent)]
    Transport(#[from] StdioError),
}

/// Tracks one process's startup sequence.
///
/// `Uninitialized -> SelectingDomain -> Constructing -> Serving`, with any
/// failing step moving to `Failed`. `Serving` and `Failed` are terminal.
#[derive(Debug)]
pub struct Launcher {
    state: LaunchState,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher {
    pub fn new() -> Self {
        Self {
            state: LaunchState::Uninitialized,
        }
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    /// Bind the process to the domain named by `selector`.
    ///
    /// Only the first call on a launcher is accepted; the selector must match
    /// a domain name exactly.
    pub fn select(&mut self, selector: Option<&str>) -> Result<DomainKind, LaunchError> {
        if self.state != LaunchState::Uninitialized {
            return Err(LaunchError::AlreadySelected);
        }
        self.transition(LaunchState::SelectingDomain);

        let Some(selector) = selector else {
            return Err(self.fail(LaunchError::MissingSelector));
        };
        match DomainKind::from_str(selector) {
            Ok(domain) => {
                self.transition(LaunchState::Constructing(domain));
                Ok(domain)
            }
            Err(error) => Err(self.fail(LaunchError::InvalidSelector {
                selector: error.value,
                valid: DomainKind::selectors(),
            })),
        }
    }

    /// Build the selected domain's server around an existing tool context.
    pub fn construct(&mut self, context: ToolContext) -> Result<DomainServer, LaunchError> {
        let domain = self.constructing("construct a server")?;
        Ok(DomainServer::build(domain, context))
    }

    /// Build the API client and widget registry from `config`, then the server.
    pub fn construct_from_config(&mut self, config: &ServerConfig) -> Result<DomainServer, LaunchError> {
        self.constructing("construct a server")?;
        let registry = config.widget_registry().map_err(|error| self.fail(error.into()))?;
        let client = RelocationClient::new(config.client_settings()).map_err(|error| self.fail(error.into()))?;
        info!(api_base = client.base_url(), widgets = registry.len(), "relocation API client ready");
        let context = ToolContext::new(Arc::new(client), Arc::new(Presenter::new(registry)));
        self.construct(context)
    }

    /// Serve `server` over stdio until the peer disconnects.
    pub async fn serve(&mut self, server: DomainServer) -> Result<(), LaunchError> {
        let domain = self.constructing("serve")?;
        if server.domain() != domain {
            return Err(LaunchError::OutOfOrder {
                action: "serve a server built for another domain",
                state: self.state,
            });
        }
        self.transition(LaunchState::Serving(domain));
        server.serve_stdio().await.map_err(|error| self.fail(error.into()))
    }

    fn constructing(&self, action: &'static str) -> Result<DomainKind, LaunchError> {
        match self.state {
            LaunchState::Constructing(domain) => Ok(domain),
            state => Err(LaunchError::OutOfOrder { action, state }),
        }
    }

    fn fail(&mut self, error: LaunchError) -> LaunchError {
        self.transition(LaunchState::Failed);
        error
    }

    fn transition(&mut self, next: LaunchState) {
        debug!(from = ?self.state, to = ?next, "launch state changed");
        self.state = next;
    }
}

/// Run one domain server for the life of the process.
///
/// `config_path` overrides the default configuration file location.
pub async fn run(selector: Option<&str>, config_path: Option<&Path>) -> Result<(), LaunchError> {
    let mut launcher = Launcher::new();
    let domain = launcher.select(selector)?;
    info!(domain = %domain, "domain selected");

    let loaded = match config_path {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };
    let config = loaded.map_err(|error| launcher.fail(error.into()))?;
    let server = launcher.construct_from_config(&config)?;
    launcher.serve(server).await
}
