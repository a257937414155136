use crate::ViewId;

/// Errors surfaced to callers of the tree and surface APIs.
///
/// Missing-ownership lookups (removing a view that is not a child, releasing
/// focus from a view that does not hold it) are not errors; those calls
/// report `false` and leave state unchanged.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("view {0:?} does not exist")]
    UnknownView(ViewId),

    /// The view is checked out of the tree because one of its own callbacks is running.
    #[error("view {0:?} is busy handling an event")]
    ViewBusy(ViewId),

    #[error("view {id:?} is not a {expected}")]
    WrongViewType { id: ViewId, expected: &'static str },

    #[error("surface has no root view")]
    NoRoot,

    #[error("view {child:?} is not a child of {parent:?}")]
    NotAChild { parent: ViewId, child: ViewId },

    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: ViewId, child: ViewId },
}

pub type Result<T> = std::result::Result<T, Error>;
