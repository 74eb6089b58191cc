mod collection;
mod credential;
mod ids;
mod item;

pub use collection::{CollectionName, DEFAULT_COLLECTION_NAME};
pub use credential::{Credential, TokenGrant};
pub use ids::{ItemId, PlaylistId, UserId};
pub use item::{Album, AlbumImage, Artist, Item};
