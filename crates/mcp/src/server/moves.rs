//! Move lifecycle tools.

use relo_api::Procedure;
use relo_types::DomainKind;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorData, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};

use crate::server::context::ToolContext;
use crate::server::schemas::{
    CreateMoveRequest, CreateTestMoveRequest, ListMovesRequest, RecordIdRequest, UpdateMoveRequest, UpdateStatusRequest,
};
use crate::server::server_info;

const LIST_MOVES: Procedure = Procedure::query("move.list");
const GET_MOVE: Procedure = Procedure::query("move.getById");
const CREATE_MOVE: Procedure = Procedure::mutation("move.create");
const UPDATE_MOVE: Procedure = Procedure::mutation("move.update");
const UPDATE_MOVE_STATUS: Procedure = Procedure::mutation("move.updateStatus");
const CREATE_TEST_MOVE: Procedure = Procedure::mutation("move.createTestMove");

const INSTRUCTIONS: &str = "Relocation move tools.\n\
- list_moves: browse moves, optionally filtered by status or employer.\n\
- get_move: one move with its employee and employer.\n\
- create_move / update_move: create or edit a move.\n\
- update_move_status: advance a move through its lifecycle.\n\
- create_test_move: generate a sample move for demos.\n\
Use ids returned by list_moves for the other tools.";

#[derive(Clone)]
pub struct MovesServer {
    context: ToolContext,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl MovesServer {
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

    #[tool(
        annotations(read_only_hint = true),
        description = "List relocation moves. Optional filters: status, employerId, limit. Returns moves with employee and destination summary."
    )]
    async fn list_moves(&self, param: Parameters<ListMovesRequest>) -> Result<CallToolResult, ErrorData> {
        self.context.invoke("list_moves", LIST_MOVES, &param.0).await
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Get one move by id, including the relocating employee and their employer."
    )]
    async fn get_move(&self, param: Parameters<RecordIdRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("get_move", "id", &param.0.id)?;
        self.context.invoke("get_move", GET_MOVE, &param.0).await
    }

    #[tool(description = "Create a move for an employee. Requires employeeId, originCity and destinationCity.")]
    async fn create_move(&self, param: Parameters<CreateMoveRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("create_move", "employeeId", &param.0.employee_id)?;
        self.context.invoke("create_move", CREATE_MOVE, &param.0).await
    }

    #[tool(description = "Update a move's cities, date or notes. Only the fields provided are changed.")]
    async fn update_move(&self, param: Parameters<UpdateMoveRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("update_move", "id", &param.0.id)?;
        self.context.invoke("update_move", UPDATE_MOVE, &param.0).await
    }

    #[tool(description = "Set the lifecycle status of a move, for example 'planning', 'in_transit' or 'completed'.")]
    async fn update_move_status(&self, param: Parameters<UpdateStatusRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("update_move_status", "id", &param.0.id)?;
        ToolContext::require_non_empty("update_move_status", "status", &param.0.status)?;
        self.context.invoke("update_move_status", UPDATE_MOVE_STATUS, &param.0).await
    }

    #[tool(description = "Create a sample move with generated employee data. Intended for demos and testing.")]
    async fn create_test_move(&self, param: Parameters<CreateTestMoveRequest>) -> Result<CallToolResult, ErrorData> {
        self.context.invoke("create_test_move", CREATE_TEST_MOVE, &param.0).await
    }
}

#[tool_handler]
impl ServerHandler for MovesServer {
    fn get_info(&self) -> ServerInfo {
        server_info(DomainKind::Moves, INSTRUCTIONS)
    }
}
