pub mod backend_worker;
