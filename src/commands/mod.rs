pub mod dialogs;
pub mod documents;
pub mod materials;
pub mod navigation;
pub mod photos;
pub mod projects;
pub mod timeline;
pub mod views;
pub mod visits;
