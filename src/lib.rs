// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Predefined functions for mediation expressions
//!
//! Evaluation core for the function calls of a message-mediation expression
//! language: `length(payload.items)`, `secret("db-password")`,
//! `substring(vars.id, 0, 4)` and the rest of the predefined catalogue. The parser
//! and the other expression nodes belong to the host; this crate supplies the
//! function call node, the dispatcher and the function library.
//!
//! ```
//! use synapse_expr::{ExpressionNode, ExpressionNodeRef, InMemoryContext, LiteralNode};
//! use synapse_expr::{ExpressionResult, PredefinedFunctionNode};
//!
//! let call = PredefinedFunctionNode::new(
//!     "substring",
//!     vec![
//!         Box::new(LiteralNode::new("hello")) as ExpressionNodeRef,
//!         Box::new(LiteralNode::new(1)) as ExpressionNodeRef,
//!         Box::new(LiteralNode::new(3)) as ExpressionNodeRef,
//!     ],
//! );
//! let mut context = InMemoryContext::new();
//! assert_eq!(call.evaluate(&mut context).unwrap(), ExpressionResult::from("el"));
//! ```

pub mod ast;
pub mod config;
pub mod evaluator;
pub mod model;
pub mod registry;

// Re-export main types
pub use ast::{ExpressionNode, ExpressionNodeRef, LiteralNode, PredefinedFunctionNode};
pub use config::{ConfigError, EngineConfig, OverflowPolicy};
pub use evaluator::{
    ContextError, EvaluationContext, EvaluationError, EvaluationResult, InMemoryContext,
    evaluate_function,
};
pub use model::{ExpressionResult, TypeInfo};
pub use registry::{FunctionCatalogue, FunctionSignature};
