//! Convergence of owned cluster objects towards their desired state.
//!
//! Each managed resource kind is reconciled the same way: build the desired
//! object, fetch the current one, then issue at most one create or update.
//! Objects carry ownership labels, and an object whose labels do not match
//! the owning instance is never touched.

pub mod ensure;
pub mod kubemodel;
pub mod labels;
pub mod objects;
pub mod owner;
pub mod store;

pub use ensure::{ensure, EnsureError, ManagedObject, Outcome};
pub use kubemodel::ObjectId;
pub use objects::rolebinding::{desired_role_binding, ensure_role_binding};
pub use owner::OwnerDescriptor;
pub use store::{Fetched, ObjectStore, StoreError};
