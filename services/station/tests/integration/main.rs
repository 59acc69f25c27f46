mod helpers;

mod clients_test;
mod pumps_test;
