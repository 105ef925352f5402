//! Clustering and recommendation logic

pub mod assign;
pub mod linkage;
pub mod recommend;

pub use assign::{assign, assign_detailed, Assignment};
pub use linkage::Dendrogram;
pub use recommend::{brands, main_categories, recommend, sub_categories, FilterOptions, Filters};
