//! Concrete entity types for the course catalogue

pub mod course;
pub mod user;

pub use course::{Course, CourseUpdate, CourseWithOwner, NewCourse};
pub use user::{NewUser, User, UserProfile};
