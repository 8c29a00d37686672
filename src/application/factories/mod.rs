mod formatter_factory;
mod resolver_factory;

pub use formatter_factory::FormatterFactory;
pub use resolver_factory::ResolverFactory;
