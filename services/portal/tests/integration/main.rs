
mod activity_test;
mod db_test;
mod evaluation_test;
mod report_test;
