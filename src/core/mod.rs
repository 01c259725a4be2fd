pub mod authenticator;
pub mod month;
pub mod org_resolver;
pub mod payslip;
pub mod pipeline;
pub mod portal;
pub mod salary_comparator;
