//! Directory and dashboard tools.

use relo_api::Procedure;
use relo_types::DomainKind;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorData, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};

use crate::server::context::ToolContext;
use crate::server::schemas::{DirectorySearchRequest, ListEmployeesRequest};
use crate::server::server_info;

const LIST_EMPLOYERS: Procedure = Procedure::query("employer.list");
const LIST_EMPLOYEES: Procedure = Procedure::query("employee.list");
const DASHBOARD_SUMMARY: Procedure = Procedure::query("dashboard.summary");

const INSTRUCTIONS: &str = "Relocation operations tools (read-only).\n\
- list_employers: client companies, optionally filtered by name.\n\
- list_employees: relocating employees, optionally by employer or name.\n\
- get_dashboard_summary: counts of active moves, pending invoices and upcoming services.";

#[derive(Clone)]
pub struct OperationsServer {
    context: ToolContext,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl OperationsServer {
    pub fn new(context: ToolContext) -> Self {
        Self {
            context,
            tool_router: Self::tool_router(),
        }
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tool_router.list_all().into_iter().map(|tool| tool.name.to_string()).collect();
        names.sort();
        names
    }

    #[tool(annotations(read_only_hint = true), description = "List employers. Optional filter: search (name).")]
    async fn list_employers(&self, param: Parameters<DirectorySearchRequest>) -> Result<CallToolResult, ErrorData> {
        self.context.invoke("list_employers", LIST_EMPLOYERS, &param.0).await
    }

    #[tool(annotations(read_only_hint = true), description = "List employees. Optional filters: employerId, search (name).")]
    async fn list_employees(&self, param: Parameters<ListEmployeesRequest>) -> Result<CallToolResult, ErrorData> {
        self.context.invoke("list_employees", LIST_EMPLOYEES, &param.0).await
    }

    #[tool(annotations(read_only_hint = true), description = "Summary counts for the relocation dashboard.")]
    async fn get_dashboard_summary(&self) -> Result<CallToolResult, ErrorData> {
        self.context.invoke_without_input("get_dashboard_summary", DASHBOARD_SUMMARY).await
    }
}

#[tool_handler]
impl ServerHandler for OperationsServer {
    fn get_info(&self) -> ServerInfo {
        server_info(DomainKind::Operations, INSTRUCTIONS)
    }
}
