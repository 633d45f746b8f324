pub mod report_reader;
