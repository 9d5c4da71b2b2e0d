pub mod message_dto;
pub mod message_handlers;
pub mod message_models;
pub mod message_repository;
pub mod message_service;
pub mod message_store;

pub use message_dto::{SendMessageRequest, SidebarResponse, SummaryResponse};
pub use message_models::{Message, MessageResponse, NewMessage};
pub use message_repository::MessageRepository;
pub use message_service::ChatService;
pub use message_store::MessageStore;
