use thirtyfour::{error::WebDriverResult, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};

pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(webdriver_url: &str) -> WebDriverResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()?;
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;

        let driver = WebDriver::new(webdriver_url, caps).await?;

        Ok(Droid { driver })
    }

    pub async fn quit(self) -> WebDriverResult<()> {
        self.driver.quit().await
    }
}
