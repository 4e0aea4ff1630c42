//! Visitor dispatch over the AST.
//!
//! This module defines the traversal contract later passes implement. A
//! visitor supplies one operation per concrete node variant; every node
//! exposes `dispatch`, which resolves on the node's own variant tag and
//! invokes the matching operation with the current environment. Variants a
//! visitor leaves unimplemented fall back to a no-op default instead of
//! aborting the traversal.

pub mod visitor;
