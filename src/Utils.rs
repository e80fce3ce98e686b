/// File loading helpers shared by the parser and the command line driver.
pub mod load_from_file;
