pub mod column_filter_dropdown;
pub mod data_table;
pub mod date_filter_select;
pub mod pagination_controls;
pub mod upload_button;
