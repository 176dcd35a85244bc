#![allow(dead_code)]

use test_gen::spec::spec_model::{
    AssertionKind, ClickType, Locator, Step, StepConfig, StepKind, Test, WaitUntil,
};

pub fn step(kind: StepKind) -> Step {
    Step {
        kind,
        description: String::new(),
        locators: Vec::new(),
        config: None,
        value: String::new(),
        input_text: String::new(),
        wait_until: None,
        max_wait: 0,
        assertion_type: None,
    }
}

pub fn input(locators: Vec<Locator>, text: &str) -> Step {
    Step {
        locators,
        input_text: text.to_string(),
        ..step(StepKind::Input)
    }
}

pub fn click(locators: Vec<Locator>, click_type: Option<ClickType>) -> Step {
    Step {
        locators,
        config: click_type.map(|ct| StepConfig {
            step_wait: None,
            click_type: Some(ct),
        }),
        ..step(StepKind::Click)
    }
}

pub fn wait(until: WaitUntil, max_wait: u64, value: &str) -> Step {
    Step {
        wait_until: Some(until),
        max_wait,
        value: value.to_string(),
        ..step(StepKind::Wait)
    }
}

pub fn assertion(locators: Vec<Locator>, kind: AssertionKind, value: &str) -> Step {
    Step {
        locators,
        assertion_type: Some(kind),
        value: value.to_string(),
        ..step(StepKind::Assertion)
    }
}

pub fn test_with(name: &str, steps: Vec<Step>) -> Test {
    Test {
        name: name.to_string(),
        description: String::new(),
        base_url: "https://example.com/login".to_string(),
        step_wait: None,
        steps,
    }
}

/// Four steps covering every step kind.
pub fn login_test() -> Test {
    let mut banner = assertion(
        vec![Locator::css(".banner").at(2)],
        AssertionKind::TextExists,
        "Welcome",
    );
    banner.config = Some(StepConfig {
        step_wait: Some(5),
        click_type: None,
    });

    test_with(
        "Login Flow",
        vec![
            input(
                vec![Locator::attribute("id", "username"), Locator::css("#user")],
                "alice",
            ),
            click(vec![Locator::xpath(r#"//button[@type="submit"]"#)], None),
            wait(WaitUntil::UrlChanged, 10, ""),
            banner,
        ],
    )
}

pub const LOGIN_SCRIPT: &str = r##"def step_0(driver):
    try:
        elem = driver.find_element_by_xpath("//*[@id='username']")
    except NoSuchElementException:
        elem = None
    if not elem:
        try:
            elem = driver.find_element_by_css_selector("#user")
        except NoSuchElementException:
            elem = None
    elem.send_keys("alice")
    print("step_0 successful")

def step_1(driver):
    try:
        elem = driver.find_element_by_xpath("//button[@type='submit']")
    except NoSuchElementException:
        elem = None
    elem_type = elem.get_attribute("type")
    if elem_type == "submit":
        elem.submit()
    else:
        elem.click()
    print("step_1 successful")

def step_2(driver):
    WebDriverWait(driver, 10).until(EC.url_changes(driver.current_url))
    print("step_2 successful")

def step_3(driver):
    try:
        elems = driver.find_elements_by_css_selector(".banner")
        elem = elems[1] if len(elems) >= 2 else None
    except NoSuchElementException:
        elem = None
    assert "Welcome" in elem.text
    driver.implicitly_wait(5)
    print("step_3 successful")

def test_login_flow(driver):
    driver.get("https://example.com/login")
    step_0(driver)
    step_1(driver)
    step_2(driver)
    step_3(driver)
"##;

pub const LOGIN_YAML: &str = r##"
test:
  name: Login Flow
  description: Signs in and checks the banner
  base_url: https://example.com/login
  steps:
    - type: input
      description: Enter the user name
      locators:
        - type: attribute
          key: id
          value: username
        - type: css_selector
          value: "#user"
      text: alice
    - type: click
      locators:
        - type: xpath
          value: '//button[@type="submit"]'
    - type: wait
      until: url_changed
      max_wait: 10
    - type: assertion
      assertionType: textExists
      value: Welcome
      locators:
        - type: css_selector
          value: .banner
          position: 2
      config:
        step_wait: 5
"##;
