pub mod common;


#[cfg(test)]
mod test_termination;

#[cfg(test)]
mod test_weather_effects;
