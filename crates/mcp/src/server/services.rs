//! Vendor service tools (flights, shipping, storage).

use relo_api::Procedure;
use relo_types::DomainKind;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorData, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};

use crate::server::context::ToolContext;
use crate::server::schemas::{CreateServiceRequest, ListServicesRequest, UpdateStatusRequest};
use crate::server::server_info;

const LIST_SERVICES: Procedure = Procedure::query("service.list");
const CREATE_SERVICE: Procedure = Procedure::mutation("service.create");
const UPDATE_SERVICE_STATUS: Procedure = Procedure::mutation("service.updateStatus");

const INSTRUCTIONS: &str = "Relocation service tools.\n\
- list_services: booked services, optionally for one move.\n\
- create_service: book a flight, shipment or storage for a move.\n\
- update_service_status: record booking progress, for example 'booked' or 'completed'.";

#[derive(Clone)]
pub struct ServicesServer {
    context: ToolContext,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ServicesServer {
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

    #[tool(annotations(read_only_hint = true), description = "List vendor services. Optional filter: moveId.")]
    async fn list_services(&self, param: Parameters<ListServicesRequest>) -> Result<CallToolResult, ErrorData> {
        self.context.invoke("list_services", LIST_SERVICES, &param.0).await
    }

    #[tool(description = "Book a vendor service for a move. Requires moveId and type; vendor, scheduledDate and cost are optional.")]
    async fn create_service(&self, param: Parameters<CreateServiceRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("create_service", "moveId", &param.0.move_id)?;
        ToolContext::require_non_empty("create_service", "type", &param.0.service_type)?;
        self.context.invoke("create_service", CREATE_SERVICE, &param.0).await
    }

    #[tool(description = "Set the status of a booked service.")]
    async fn update_service_status(&self, param: Parameters<UpdateStatusRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("update_service_status", "id", &param.0.id)?;
        ToolContext::require_non_empty("update_service_status", "status", &param.0.status)?;
        self.context.invoke("update_service_status", UPDATE_SERVICE_STATUS, &param.0).await
    }
}

#[tool_handler]
impl ServerHandler for ServicesServer {
    fn get_info(&self) -> ServerInfo {
        server_info(DomainKind::Services, INSTRUCTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::testing::{RecordingBackend, context_with, response_text};
    use serde_json::json;

    #[test]
    fn exposes_service_tools_only() {
        let server = ServicesServer::new(context_with(RecordingBackend::returning(json!(null))));
        assert_eq!(server.tool_names(), vec!["create_service", "list_services", "update_service_status"]);
    }

    #[tokio::test]
    async fn create_service_sends_type_field() {
        let backend = RecordingBackend::returning(json!({"id": "s1", "type": "flight"}));
        let server = ServicesServer::new(context_with(backend.clone()));
        let result = server
            .create_service(Parameters(CreateServiceRequest {
                move_id: "m1".into(),
                service_type: "flight".into(),
                vendor: Some("Delta".into()),
                scheduled_date: None,
                cost: None,
            }))
            .await
            .expect("tool result");
        assert_eq!(response_text(&result).as_deref(), Some(r#"{"id":"s1","type":"flight"}"#));
        assert_eq!(
            backend.last_call(),
            ("service.create".to_string(), json!({"moveId": "m1", "type": "flight", "vendor": "Delta"}))
        );
    }

    #[tokio::test]
    async fn list_services_scoped_to_move() {
        let backend = RecordingBackend::returning(json!([]));
        let server = ServicesServer::new(context_with(backend.clone()));
        server
            .list_services(Parameters(ListServicesRequest { move_id: Some("m1".into()) }))
            .await
            .expect("tool result");
        assert_eq!(backend.last_call(), ("service.list".to_string(), json!({"moveId": "m1"})));
    }
}
