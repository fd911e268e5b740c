// Fusen services
// Services talk to the outside world: the remote bookmark API and the settings file.

pub mod bookmark_client;
pub mod settings_engine;
