mod text;

pub use text::{fit_column, truncate_with_ellipsis};
