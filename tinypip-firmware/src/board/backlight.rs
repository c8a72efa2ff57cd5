//! PWM panel backlight (GPIO13, PWM slice 6 channel B)

use embassy_rp::peripherals::{PIN_13, PWM_SLICE6};
use embassy_rp::pwm::{Config, Pwm};
use embassy_rp::Peri;
use tinypip_core::traits::Backlight;

/// PWM counter wrap value
const PWM_TOP: u16 = 10_000;

pub struct PwmBacklight {
    pwm: Pwm<'static>,
    config: Config,
}

impl PwmBacklight {
    /// Bind the backlight pin; starts dark
    pub fn new(slice: Peri<'static, PWM_SLICE6>, pin: Peri<'static, PIN_13>) -> Self {
        let mut config = Config::default();
        config.top = PWM_TOP;
        config.compare_b = 0;
        let pwm = Pwm::new_output_b(slice, pin, config.clone());
        Self { pwm, config }
    }
}

impl Backlight for PwmBacklight {
    fn set_level(&mut self, percent: u8) {
        let percent = u32::from(percent.min(100));
        self.config.compare_b = (u32::from(PWM_TOP) * percent / 100) as u16;
        self.pwm.set_config(&self.config);
    }
}
