//! Use cases

mod assemble_form;

pub use assemble_form::FormAssembler;
