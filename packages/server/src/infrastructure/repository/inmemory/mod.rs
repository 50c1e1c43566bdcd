mod message;
mod presence;

pub use message::InMemoryMessageRepository;
pub use presence::InMemoryPresenceRegistry;
