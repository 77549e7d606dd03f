//! Invoice tools.

use relo_api::Procedure;
use relo_types::DomainKind;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorData, ServerInfo};
use rmcp::{ServerHandler, tool, tool_handler, tool_router};

use crate::server::context::ToolContext;
use crate::server::schemas::{CreateInvoiceRequest, ListInvoicesRequest, MarkInvoicePaidRequest, RecordIdRequest};
use crate::server::server_info;

const LIST_INVOICES: Procedure = Procedure::query("invoice.list");
const GET_INVOICE: Procedure = Procedure::query("invoice.getById");
const CREATE_INVOICE: Procedure = Procedure::mutation("invoice.create");
const MARK_INVOICE_PAID: Procedure = Procedure::mutation("invoice.markPaid");

const INSTRUCTIONS: &str = "Relocation financial tools.\n\
- list_invoices: invoices, optionally by move or status.\n\
- get_invoice: one invoice by id.\n\
- create_invoice: bill an amount against a move.\n\
- mark_invoice_paid: record payment for an invoice.";

#[derive(Clone)]
pub struct FinancialServer {
    context: ToolContext,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl FinancialServer {
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

    #[tool(annotations(read_only_hint = true), description = "List invoices. Optional filters: moveId, status ('pending', 'paid').")]
    async fn list_invoices(&self, param: Parameters<ListInvoicesRequest>) -> Result<CallToolResult, ErrorData> {
        self.context.invoke("list_invoices", LIST_INVOICES, &param.0).await
    }

    #[tool(annotations(read_only_hint = true), description = "Get one invoice by id.")]
    async fn get_invoice(&self, param: Parameters<RecordIdRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("get_invoice", "id", &param.0.id)?;
        self.context.invoke("get_invoice", GET_INVOICE, &param.0).await
    }

    #[tool(description = "Create an invoice for a move. Requires moveId and amount; dueDate and description are optional.")]
    async fn create_invoice(&self, param: Parameters<CreateInvoiceRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("create_invoice", "moveId", &param.0.move_id)?;
        self.context.invoke("create_invoice", CREATE_INVOICE, &param.0).await
    }

    #[tool(description = "Mark an invoice as paid. paidAt defaults to the current time on the server.")]
    async fn mark_invoice_paid(&self, param: Parameters<MarkInvoicePaidRequest>) -> Result<CallToolResult, ErrorData> {
        ToolContext::require_non_empty("mark_invoice_paid", "id", &param.0.id)?;
        self.context.invoke("mark_invoice_paid", MARK_INVOICE_PAID, &param.0).await
    }
}

#[tool_handler]
impl ServerHandler for FinancialServer {
    fn get_info(&self) -> ServerInfo {
        server_info(DomainKind::Financial, INSTRUCTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::testing::{RecordingBackend, context_with, response_text};
    use serde_json::json;

    #[test]
    fn exposes_invoice_tools_only() {
        let server = FinancialServer::new(context_with(RecordingBackend::returning(json!(null))));
        assert_eq!(
            server.tool_names(),
            vec!["create_invoice", "get_invoice", "list_invoices", "mark_invoice_paid"]
        );
    }

    #[tokio::test]
    async fn list_invoices_passes_filters() {
        let backend = RecordingBackend::returning(json!([{"invoiceNumber": "INV-7", "amount": 1200}]));
        let server = FinancialServer::new(context_with(backend.clone()));
        let result = server
            .list_invoices(Parameters(ListInvoicesRequest {
                move_id: None,
                status: Some("pending".into()),
            }))
            .await
            .expect("tool result");
        assert_eq!(response_text(&result).as_deref(), Some(r#"[{"invoiceNumber":"INV-7","amount":1200}]"#));
        assert_eq!(backend.last_call(), ("invoice.list".to_string(), json!({"status": "pending"})));
    }

    #[tokio::test]
    async fn create_invoice_leaves_amount_checks_to_the_api() {
        let backend = RecordingBackend::returning(json!({"id": "i2", "amount": 0}));
        let server = FinancialServer::new(context_with(backend.clone()));
        server
            .create_invoice(Parameters(CreateInvoiceRequest {
                move_id: "m1".into(),
                amount: 0.0,
                due_date: None,
                description: None,
            }))
            .await
            .expect("tool result");
        assert_eq!(backend.last_call(), ("invoice.create".to_string(), json!({"moveId": "m1", "amount": 0.0})));
    }

    #[tokio::test]
    async fn mark_paid_is_a_mutation_on_the_invoice() {
        let backend = RecordingBackend::returning(json!({"id": "i1", "status": "paid"}));
        let server = FinancialServer::new(context_with(backend.clone()));
        server
            .mark_invoice_paid(Parameters(MarkInvoicePaidRequest {
                id: "i1".into(),
                paid_at: None,
            }))
            .await
            .expect("tool result");
        assert_eq!(backend.last_call(), ("invoice.markPaid".to_string(), json!({"id": "i1"})));
    }
}
