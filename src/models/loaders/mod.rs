pub mod id_list;

pub use id_list::load_id_list;
