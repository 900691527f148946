//! Reference checking: label retention on direct calls, label suppression
//! on value references, and contextual selection among overloads.

mod initializers;
mod members;
mod module_qualified;
mod session;
