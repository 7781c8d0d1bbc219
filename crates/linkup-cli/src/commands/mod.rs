pub mod completion;
pub mod note;
pub mod run;
