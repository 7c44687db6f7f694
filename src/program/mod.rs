//! Program access for the reconstruction core
//!
//! The core never looks at a method body directly. It asks an
//! [`InstructionQuery`] about single instructions and their lexical
//! neighbours, and a [`ValueOracle`] about the concrete values a program value
//! can take. [`Program`] and [`ConstantOracle`] are in-memory implementations
//! of both, used to drive the core without a bytecode backend.

pub mod query;
pub mod oracle;
pub mod body;

pub use self::query::{InstructionQuery, RhsShape};
pub use self::oracle::{ConcreteValue, Resolution, ValueOracle, ValueRef};
pub use self::body::{CallExpr, ConstantOracle, Expr, InstrSite, Instruction, MethodBody, Operand, Program};
