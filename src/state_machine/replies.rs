//! Fixed command vocabulary and reply texts

pub const START_COMMAND: &str = "/start";
pub const HELP_COMMAND: &str = "/help";

// Matched exactly, as sent by the keyboard buttons
pub const WEATHER_LABEL: &str = "Weather Info";
pub const CAR_LABEL: &str = "Car Info";

pub const WELCOME: &str = "Welcome to the Bot! Use the buttons below to navigate.";

pub const HELP: &str = "/start - Start the bot\n\
/help - Show this help message\n\
Weather Info - Get weather information for a city\n\
Car Info - Get information about a car using OpenAI";

pub const ASK_CITY: &str = "Please enter the name of the city to get weather information.";

pub const ASK_CAR: &str =
    "Please enter the make and model of the car to get information about it.";

pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that command.";

pub const WEATHER_FAILED: &str = "Sorry, there was an error retrieving the weather information.";

pub const CAR_NOT_FOUND: &str = "Sorry, I couldn't retrieve information about that car.";

pub const CAR_FAILED: &str = "Sorry, there was an error retrieving the information.";

pub fn weather_reply(body: &str) -> String {
    format!("{WEATHER_LABEL}:\n{body}")
}

pub fn car_reply(body: &str) -> String {
    format!("{CAR_LABEL}:\n{body}")
}
