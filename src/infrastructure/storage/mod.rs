pub mod csv_record_store;
