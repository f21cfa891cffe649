pub mod error;
pub mod firestore;
pub mod omdb;
pub mod traits;

pub use error::RemoteError;
pub use firestore::FirestoreProfileStore;
pub use omdb::OmdbClient;
pub use traits::{Catalog, ProfileStore};
