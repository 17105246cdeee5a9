/// Pull request labeling run
pub mod label;
