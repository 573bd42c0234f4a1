//! Cashier View
//!
//! Order entry. Holds the station's running "next order number" counter
//! (seeded at 1) and the sticky form fields. On a successful submission
//! the fields clear and the counter advances past the number actually
//! used; on failure everything stays put so the operator can resubmit
//! manually. No retry policy.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use shared::models::{Order, OrderDraft};
use validator::Validate;

use crate::store::OrderRepository;
use crate::utils::{AppError, AppResult};

/// Form state as the operator sees it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CashierForm {
    /// Suggested numero for the next order
    pub next_numero: i64,
    pub nombre: String,
    pub detalles: String,
}

impl Default for CashierForm {
    fn default() -> Self {
        Self {
            next_numero: 1,
            nombre: String::new(),
            detalles: String::new(),
        }
    }
}

/// Submission payload
///
/// All three fields are required by the form; they are re-validated here
/// defensively. `numero` may be omitted to take the counter's suggestion,
/// or set explicitly; the operator can override it, and no uniqueness
/// check is made either way.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitOrder {
    pub numero: Option<i64>,
    #[validate(length(min = 1, message = "nombre is required"))]
    pub nombre: String,
    #[validate(length(min = 1, message = "detalles is required"))]
    pub detalles: String,
}

/// Order-entry screen
pub struct CashierView {
    repo: OrderRepository,
    form: Mutex<CashierForm>,
}

impl CashierView {
    pub fn new(repo: OrderRepository) -> Self {
        Self {
            repo,
            form: Mutex::new(CashierForm::default()),
        }
    }

    /// Current form state
    pub fn form(&self) -> CashierForm {
        self.form.lock().expect("form lock poisoned").clone()
    }

    /// Submit a new order.
    ///
    /// Success: fields clear, counter becomes used+1, the created order
    /// comes back. Failure: fields keep the submitted values and the
    /// counter does not advance.
    pub async fn submit(&self, request: SubmitOrder) -> AppResult<Order> {
        request
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;
        if request.nombre.trim().is_empty() || request.detalles.trim().is_empty() {
            return Err(AppError::validation(
                "nombre and detalles must not be blank",
            ));
        }

        let numero = {
            let mut form = self.form.lock().expect("form lock poisoned");
            // Keep the submitted values visible until the store accepts
            form.nombre = request.nombre.clone();
            form.detalles = request.detalles.clone();

            let numero = request.numero.unwrap_or(form.next_numero);
            if numero < form.next_numero {
                // Permitted: duplicates are accepted behavior, the counter
                // is only a suggestion
                tracing::debug!(numero, counter = form.next_numero, "numero below counter");
            }
            numero
        };

        let draft = OrderDraft {
            numero,
            nombre: request.nombre,
            detalles: request.detalles,
        };
        let order = self.repo.create_order(draft).await.map_err(AppError::from)?;

        let mut form = self.form.lock().expect("form lock poisoned");
        form.nombre.clear();
        form.detalles.clear();
        form.next_numero = numero + 1;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, OrderStore};
    use std::sync::Arc;

    fn cashier(store: &Arc<MemoryStore>) -> CashierView {
        CashierView::new(OrderRepository::new(store.clone() as Arc<dyn OrderStore>))
    }

    fn submission(nombre: &str, detalles: &str) -> SubmitOrder {
        SubmitOrder {
            numero: None,
            nombre: nombre.to_string(),
            detalles: detalles.to_string(),
        }
    }

    #[tokio::test]
    async fn counter_seeds_at_one_and_advances_on_success() {
        let store = Arc::new(MemoryStore::new());
        let view = cashier(&store);
        assert_eq!(view.form().next_numero, 1);

        let order = view.submit(submission("Ana", "2 tacos")).await.unwrap();
        assert_eq!(order.numero, 1);

        let form = view.form();
        assert_eq!(form.next_numero, 2);
        assert!(form.nombre.is_empty());
        assert!(form.detalles.is_empty());
    }

    #[tokio::test]
    async fn operator_override_moves_the_counter() {
        let store = Arc::new(MemoryStore::new());
        let view = cashier(&store);

        let order = view
            .submit(SubmitOrder {
                numero: Some(40),
                nombre: "Luis".to_string(),
                detalles: "1 torta".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(order.numero, 40);
        assert_eq!(view.form().next_numero, 41);
    }

    #[tokio::test]
    async fn duplicate_numero_is_accepted() {
        let store = Arc::new(MemoryStore::new());
        let view = cashier(&store);

        view.submit(submission("Ana", "2 tacos")).await.unwrap();
        let dup = view
            .submit(SubmitOrder {
                numero: Some(1),
                nombre: "Luis".to_string(),
                detalles: "1 torta".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(dup.numero, 1);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn store_failure_keeps_fields_and_counter() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let view = cashier(&store);

        let err = view.submit(submission("Ana", "2 tacos")).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        let form = view.form();
        assert_eq!(form.next_numero, 1);
        assert_eq!(form.nombre, "Ana");
        assert_eq!(form.detalles, "2 tacos");

        // Manual resubmission works once the store recovers
        store.set_fail_writes(false);
        let order = view.submit(submission("Ana", "2 tacos")).await.unwrap();
        assert_eq!(order.numero, 1);
        assert_eq!(view.form().next_numero, 2);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let store = Arc::new(MemoryStore::new());
        let view = cashier(&store);

        let err = view.submit(submission("", "2 tacos")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = view.submit(submission("Ana", "   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.is_empty());
        assert_eq!(view.form().next_numero, 1);
    }
}
