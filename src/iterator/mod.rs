/// Iterator module for tablewalk
///
/// Provides lazy traversal of nested tables along a dotted path pattern:
///
/// ```text
/// "services.*.ports.*"
///     ↓ Pattern::parse
/// [Literal(services), Wildcard, Literal(ports), Wildcard]
///     ↓ ValuesIterator
/// every value reachable by substituting a key for each `*`
/// ```
///
/// ## Key Design Principles
///
/// 1. **Lazy Evaluation**: Only resolve the next path when `next()` is called
/// 2. **Odometer Order**: The last wildcard cycles fastest, like nested loops
/// 3. **Silent Dead Ends**: Missing fields and non-table values are skipped,
///    never reported
/// 4. **Sticky Exhaustion**: Once `next()` returns `None` it keeps doing so
mod pattern;
mod values_iterator;

pub use pattern::{Pattern, SEPARATOR, Segment, WILDCARD};
pub use values_iterator::ValuesIterator;
