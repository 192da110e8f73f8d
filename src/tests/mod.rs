mod planning;
mod scans;
mod utils;
