pub mod invitation_service;
pub mod messages;
pub mod row_mapper;
