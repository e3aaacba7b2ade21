//! different utility modules used throughout the project
/// tiny module to set up logging and to save sampled plot data into a csv file
pub mod logger;
/// settings of the command line calculator read from a "title key: value" document
pub mod settings;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
