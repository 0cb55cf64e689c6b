pub mod feed;
pub mod gpa;
pub mod subject;
pub mod timetable;
pub mod user;

pub use feed::{Comment, Folder, NewCommentRequest, NewFolderRequest, NewPostRequest, Post, SavePostRequest};
pub use gpa::{AddCalculatorSubjectRequest, GradedSubject, SetGradeRequest, TrimesterRecord};
pub use subject::Subject;
pub use timetable::{NewTimetableEntryRequest, TimetableEntry};
pub use user::{LoginRequest, SignupRequest, User};
