pub mod detail_panel;
pub mod footer;
pub mod header;
pub mod program_list;
pub mod prompt;
