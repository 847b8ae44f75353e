//! Input validators

pub mod cpf;
