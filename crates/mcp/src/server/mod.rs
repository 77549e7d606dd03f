mod context;
mod errors;
mod financial;
mod housing;
mod log_payload;
mod moves;
mod operations;
mod schemas;
mod services;

pub use context::ToolContext;
pub use financial::FinancialServer;
pub use housing::HousingServer;
pub use moves::MovesServer;
pub use operations::OperationsServer;
pub use services::ServicesServer;

use std::fmt;

use relo_types::DomainKind;
use rmcp::ServiceExt;
use rmcp::model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo};
use thiserror::Error;
use tracing::info;

/// Handshake metadata shared by every domain server.
fn server_info(domain: DomainKind, instructions: &str) -> ServerInfo {
    ServerInfo {
        capabilities: ServerCapabilities::builder().enable_tools().build(),
        protocol_version: ProtocolVersion::LATEST,
        server_info: Implementation {
            name: domain.server_name(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: Some(format!("Relo {domain} tools")),
            ..Default::default()
        },
        instructions: Some(instructions.to_string()),
    }
}

/// One of the five domain tool servers, chosen at startup.
#[derive(Clone)]
pub enum DomainServer {
    Moves(MovesServer),
    Housing(HousingServer),
    Services(ServicesServer),
    Financial(FinancialServer),
    Operations(OperationsServer),
}

impl DomainServer {
    pub fn build(domain: DomainKind, context: ToolContext) -> Self {
        match domain {
            DomainKind::Moves => Self::Moves(MovesServer::new(context)),
            DomainKind::Housing => Self::Housing(HousingServer::new(context)),
            DomainKind::Services => Self::Services(ServicesServer::new(context)),
            DomainKind::Financial => Self::Financial(FinancialServer::new(context)),
            DomainKind::Operations => Self::Operations(OperationsServer::new(context)),
        }
    }

    pub fn domain(&self) -> DomainKind {
        match self {
            Self::Moves(_) => DomainKind::Moves,
            Self::Housing(_) => DomainKind::Housing,
            Self::Services(_) => DomainKind::Services,
            Self::Financial(_) => DomainKind::Financial,
            Self::Operations(_) => DomainKind::Operations,
        }
    }

    /// Names of the tools this server exposes, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        match self {
            Self::Moves(server) => server.tool_names(),
            Self::Housing(server) => server.tool_names(),
            Self::Services(server) => server.tool_names(),
            Self::Financial(server) => server.tool_names(),
            Self::Operations(server) => server.tool_names(),
        }
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> Result<(), StdioError> {
        let domain = self.domain();
        info!(server = %domain.server_name(), tools = ?self.tool_names(), "serving over stdio");
        match self {
            Self::Moves(server) => serve_on_stdio(server).await,
            Self::Housing(server) => serve_on_stdio(server).await,
            Self::Services(server) => serve_on_stdio(server).await,
            Self::Financial(server) => serve_on_stdio(server).await,
            Self::Operations(server) => serve_on_stdio(server).await,
        }
    }
}

impl fmt::Debug for DomainServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainServer")
            .field("domain", &self.domain())
            .field("tools", &self.tool_names())
            .finish()
    }
}

/// Failures of the stdio transport.
#[derive(Debug, Error)]
pub enum StdioError {
    #[error("failed to start stdio transport: {0}")]
    Start(String),

    #[error("stdio transport stopped unexpectedly: {0}")]
    Stopped(String),
}

async fn serve_on_stdio<S>(server: S) -> Result<(), StdioError>
where
    S: rmcp::ServerHandler,
{
    let running = server
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await
        .map_err(|error| StdioError::Start(error.to_string()))?;
    let reason = running.waiting().await.map_err(|error| StdioError::Stopped(error.to_string()))?;
    info!(?reason, "stdio session ended");
    Ok(())
}
