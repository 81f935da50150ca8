#![deny(missing_docs)]

//! # Security Conversion
//!
//! Maps Swagger 2.0 security definitions into target security schemes.
//! Secret values are never copied: each scheme carries an environment
//! variable placeholder named after the configured prefix and the scheme key.

use crate::error::{ConvertError, ConvertResult};
use crate::oas::document::{self, SecurityScheme as SecurityDefinition};
use crate::oas::routes::naming::to_constant_case;
use crate::options::ConvertOptions;
use crate::schema::{
    ApiKeyLocation, EnvTemplate, OAuthFlow, OAuthFlowType, SecurityRequirement, SecurityScheme,
};
use std::collections::BTreeMap;

/// Converts one security definition registered under `key`.
pub fn convert_security_scheme(
    key: &str,
    definition: &SecurityDefinition,
    options: &ConvertOptions,
) -> ConvertResult<SecurityScheme> {
    match definition.scheme_type.as_str() {
        "apiKey" => {
            let location: ApiKeyLocation = definition.location.as_deref().unwrap_or_default().parse()?;
            let name = definition
                .name
                .clone()
                .filter(|n| !n.is_empty())
                .ok_or(ConvertError::EmptyApiKeyName)?;
            Ok(SecurityScheme::ApiKey {
                location,
                name,
                value: EnvTemplate::new(to_constant_case(&[options.env_prefix.as_str(), key]))
                    .to_string(),
            })
        }
        "basic" => Ok(SecurityScheme::Http {
            scheme: "Basic".to_string(),
            header: "Authorization".to_string(),
            value: EnvTemplate::new(to_constant_case(&[options.env_prefix.as_str(), key, "TOKEN"]))
                .to_string(),
        }),
        "oauth2" => {
            let flow_type = oauth_flow_type(definition.flow.as_deref().unwrap_or_default())?;
            let flow = OAuthFlow {
                authorization_url: definition.authorization_url.clone(),
                token_url: definition.token_url.clone(),
                scopes: definition.scopes.clone(),
            };
            Ok(SecurityScheme::OAuth2 {
                flows: BTreeMap::from([(flow_type, flow)]),
            })
        }
        other => Err(ConvertError::UnsupportedSecurityScheme(other.to_string())),
    }
}

fn oauth_flow_type(flow: &str) -> ConvertResult<OAuthFlowType> {
    match flow {
        "accessCode" => Ok(OAuthFlowType::AuthorizationCode),
        "implicit" => Ok(OAuthFlowType::Implicit),
        "password" => Ok(OAuthFlowType::Password),
        "application" => Ok(OAuthFlowType::ClientCredentials),
        other => Err(ConvertError::UnsupportedOAuthFlow(other.to_string())),
    }
}

/// Copies security requirements through. Absent requirements become an empty
/// list.
pub fn convert_security_requirements(
    requirements: Option<&[document::SecurityRequirement]>,
) -> Vec<SecurityRequirement> {
    requirements
        .unwrap_or_default()
        .iter()
        .map(|req| {
            req.iter()
                .map(|(name, scopes)| (name.clone(), scopes.clone()))
                .collect()
        })
        .collect()
}
