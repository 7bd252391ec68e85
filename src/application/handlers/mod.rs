//! Application handlers - one per workflow operation.

mod answer_generator;
mod capture_email;
mod consult_board;
mod route_query;

pub use answer_generator::AnswerGenerator;
pub use capture_email::{CaptureEmailCommand, CaptureEmailHandler, CaptureEmailResult};
pub use consult_board::{ConsultBoardCommand, ConsultBoardHandler};
pub use route_query::{RouteQueryCommand, RouteQueryHandler, RouteQueryResult};
