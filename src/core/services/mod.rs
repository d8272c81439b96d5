pub mod bill_service;
pub mod category_service;
pub mod depositor_service;
pub mod summary_service;

pub use bill_service::BillService;
pub use category_service::CategoryService;
pub use depositor_service::DepositorService;
pub use summary_service::{DashboardSummary, SummaryService};

use crate::cep::CepError;
use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Lookup(#[from] CepError),
    #[error("{0}")]
    Invalid(String),
}
