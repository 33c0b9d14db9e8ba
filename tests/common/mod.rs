//! 测试公共模块
//! 提供测试配置与模拟控制中心

#![allow(dead_code)]

use build_initial_hubspot_data::config::{ControlCenterConfig, ControlCenterCredentials};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 测试使用的令牌
pub const TEST_TOKEN: &str = "test-token-for-control-center";

/// 创建指向模拟服务器的测试配置
pub fn create_test_config(endpoint: &str) -> ControlCenterConfig {
    let credentials = ControlCenterCredentials::new(endpoint, TEST_TOKEN)
        .expect("Failed to create test credentials");
    ControlCenterConfig::new(credentials)
}

/// 示例传感器数据
pub fn sample_sensors() -> Value {
    json!([
        { "id": "sensor-001", "name": "Boiler room", "status": "active" },
        { "id": "sensor-002", "name": "Loading dock", "status": "active" }
    ])
}

/// 挂载传感器接口，校验 Bearer 令牌与 status 参数
pub async fn mount_sensors(server: &MockServer, status: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/get-sensors"))
        .and(query_param("status", status))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}
