//! Recurring transfer intents: parse a sentence, validate it into a [`Plan`], and compile
//! the plan into contract source plus a deployment [`Manifest`].
//!
//! ```text
//! "Send 10 PYUSD to alice.eth every weekly until ETH > 3000"
//!   └─ parser ─▶ Intent ─ planner ─▶ Plan ─ compiler ─▶ (source, Manifest)
//! ```

pub mod codec;
pub mod compiler;
pub mod errors;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod planner;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod template;

pub use recurring_intent_types as types;
pub use recurring_intent_types::{Intent, Manifest, Plan};

pub use compiler::{Compiled, Compiler};
pub use errors::{
    CodecError, CompileError, ParseError, ParseErrorKind, RegistryError, ResolveError, TemplateError,
    ValidationError,
};
pub use parser::{parse, Parser};
pub use planner::{Planner, PlannerConfig};
pub use registry::{ChainInfo, Registry, TokenInfo};
pub use resolver::{NameResolver, NullResolver, StaticResolver};
pub use store::{ArtifactStore, FsArtifactStore, MemoryArtifactStore};
pub use template::Template;

#[cfg(test)]
mod tests;
