pub mod report;
pub mod roster;

use summit_checkin::{CheckInConfig, CheckInDesk, JsonFileStore, LogSink};

/// Open the desk for `config` with the event log attached.
pub fn open_desk(config: &CheckInConfig) -> anyhow::Result<CheckInDesk<JsonFileStore>> {
    let store = JsonFileStore::new(&config.data_dir, &config.storage_key)?;
    let mut desk = CheckInDesk::open(store, config.capacity);
    desk.add_sink(Box::new(LogSink::new(&config.events_log, &config.storage_key)));
    Ok(desk)
}
