//! Declarative service objects.
//!
//! A service object is a small unit of business logic built from named
//! attributes and run through a single `call` entry point. Variants declare
//! required, optional and defaulted attributes once; construction validates
//! every input mapping against those declarations.

pub mod contract;
pub mod logging;
pub mod scaffold;
pub mod service;

pub use contract::attribute_contract::{AttributeContract, ContractBuilder};
pub use contract::declaration::ContractDeclaration;
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingConfig};
pub use scaffold::generator::{
    render_service_template, GeneratedService, GeneratorConfig, ScaffoldError, ServiceGenerator,
    DEFAULT_SERVICES_DIR,
};
pub use scaffold::inflection::{camelize, classify, singularize, underscore};
pub use scaffold::naming::{NameError, ServiceName};
pub use service::engine::{call, construct, ServiceObject};
pub use service::error::{ServiceError, ServiceResult};
pub use service::instance::{AttributeMap, ServiceInstance};
pub use service::registry::{CallHandler, RegistryError, RegistryResult, ServiceRegistry};
