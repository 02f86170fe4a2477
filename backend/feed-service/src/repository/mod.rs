mod comments;
mod posts;

pub use comments::CommentRepository;
pub use posts::PostRepository;
