pub mod outage_client;
