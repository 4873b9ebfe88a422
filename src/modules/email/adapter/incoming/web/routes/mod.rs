mod contact;

pub use contact::contact_handler;
pub use contact::__path_contact_handler;
pub use contact::ContactRequest;
