//! Housing option tools.

use relo_api::Procedure;
use relo_types::DomainKind;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorData, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};

use crate::server::context::ToolContext;
use crate::server::schemas::{CreateHousingOptionRequest, MoveScopedRequest, SearchHousingRequest, SelectHousingOptionRequest};
use crate::server::server_info;

const LIST_HOUSING: Procedure = Procedure::query("housing.list");
const SEARCH_HOUSING: Procedure = Procedure::query("housing.search");
const CREATE_HOUSING: Procedure = Procedure::mutation("housing.create");
const SELECT_HOUSING: Procedure = Procedure::mutation("housing.select");

const INSTRUCTIONS: &str = "Relocation housing tools.\n\
- list_housing_options: options already attached to a move.\n\
- search_housing: find listings in a city by price and bedrooms.\n\
- create_housing_option: attach a listing to a move.\n\
- select_housing_option: mark the chosen option for a move.";

#[derive(Clone)]
pub struct HousingServer {
    context: ToolContext,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl HousingServer {
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

    #[tool(annotations(read_only_hint = true), description = "List housing options attached to a move. Requires moveId.")]
    async fn list_housing_options(&self, param: Parameters<MoveScopedRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("list_housing_options", "moveId", &param.0.move_id)?;
        self.context.invoke("list_housing_options", LIST_HOUSING, &param.0).await
    }

    #[tool(
        annotations(read_only_hint = true),
        description = "Search housing listings in a city. Optional filters: maxPrice (monthly), bedrooms (minimum)."
    )]
    async fn search_housing(&self, param: Parameters<SearchHousingRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("search_housing", "city", &param.0.city)?;
        self.context.invoke("search_housing", SEARCH_HOUSING, &param.0).await
    }

    #[tool(description = "Attach a housing option to a move. Requires moveId, address and monthly price.")]
    async fn create_housing_option(&self, param: Parameters<CreateHousingOptionRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("create_housing_option", "moveId", &param.0.move_id)?;
        self.context.invoke("create_housing_option", CREATE_HOUSING, &param.0).await
    }

    #[tool(description = "Mark one housing option as selected for its move. Other options on the move are deselected.")]
    async fn select_housing_option(&self, param: Parameters<SelectHousingOptionRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("select_housing_option", "housingOptionId", &param.0.housing_option_id)?;
        self.context.invoke("select_housing_option", SELECT_HOUSING, &param.0).await
    }
}

#[tool_handler]
impl ServerHandler for HousingServer {
    fn get_info(&self) -> ServerInfo {
        server_info(DomainKind::Housing, INSTRUCTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::testing::{RecordingBackend, context_with, response_text};
    use serde_json::json;

    #[test]
    fn exposes_housing_tools_only() {
        let server = HousingServer::new(context_with(RecordingBackend::returning(json!(null))));
        assert_eq!(
            server.tool_names(),
            vec!["create_housing_option", "list_housing_options", "search_housing", "select_housing_option"]
        );
    }

    #[tokio::test]
    async fn search_housing_is_a_query_with_filters() {
        let backend = RecordingBackend::returning(json!([{"address": "1 Main St", "price": 1800}]));
        let server = HousingServer::new(context_with(backend.clone()));

        let result = server
            .search_housing(Parameters(SearchHousingRequest {
                city: "Denver".into(),
                max_price: Some(2000.0),
                bedrooms: None,
            }))
            .await
            .expect("tool result");

        assert_eq!(response_text(&result).as_deref(), Some(r#"[{"address":"1 Main St","price":1800}]"#));
        assert_eq!(
            backend.last_call(),
            ("housing.search".to_string(), json!({"city": "Denver", "maxPrice": 2000.0}))
        );
    }

    #[tokio::test]
    async fn select_forwards_both_ids() {
        let backend = RecordingBackend::returning(json!({"id": "h1", "selected": true}));
        let server = HousingServer::new(context_with(backend.clone()));
        server
            .select_housing_option(Parameters(SelectHousingOptionRequest {
                move_id: "m1".into(),
                housing_option_id: "h1".into(),
            }))
            .await
            .expect("tool result");
        assert_eq!(
            backend.last_call(),
            ("housing.select".to_string(), json!({"moveId": "m1", "housingOptionId": "h1"}))
        );
    }

    #[tokio::test]
    async fn api_failure_surfaces_as_tool_error() {
        let server = HousingServer::new(context_with(RecordingBackend::failing()));
        let error = server
            .list_housing_options(Parameters(MoveScopedRequest { move_id: "m1".into() }))
            .await
            .expect_err("api failure");
        assert!(error.message.contains("housing.list"));
    }
}
