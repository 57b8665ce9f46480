//! Publication model matching the frontend Publication interface.

use serde::{Deserialize, Serialize};

/// An academic publication in the group's repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub author_id: String,
    /// Author name denormalized at write time; never re-synced.
    pub author_name: String,
    pub r#abstract: String,
    pub link: String,
    pub category: String,
    pub created_at: String,
}

/// Request body for publishing a new entry.
///
/// Author fields are taken from the authenticated caller, not the body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublicationRequest {
    pub title: String,
    #[serde(default)]
    pub r#abstract: String,
    pub link: String,
    #[serde(default)]
    pub category: String,
}

/// The founding publications bundled with the portal.
///
/// Served whenever the publications table is empty so a fresh install
/// is never blank. One real record replaces them entirely.
pub fn placeholder_publications() -> Vec<Publication> {
    vec![
        Publication {
            id: "1".to_string(),
            title: "A emenda do intelecto: uma perspectiva pedagógica a partir de Spinoza"
                .to_string(),
            author_id: "divino-viana".to_string(),
            author_name: "Prof. Me. Divino Viana".to_string(),
            r#abstract: "Dissertação de Mestrado Profissional em Ensino de Filosofia pela \
                         Universidade Federal do Tocantins (UFT)."
                .to_string(),
            link: "https://bdtd.ibict.br/vufind/Record/UFT_b685b3a7ea14e7ba7b8ccf8870930289"
                .to_string(),
            category: "Epistemologia".to_string(),
            created_at: "2022-01-01".to_string(),
        },
        Publication {
            id: "2".to_string(),
            title: "O estatuto da matemática na ontologia e na teoria do conhecimento de Spinoza"
                .to_string(),
            author_id: "divino-viana".to_string(),
            author_name: "Prof. Me. Divino Viana".to_string(),
            r#abstract: "Artigo publicado na Revista Helius explorando as conexões matemáticas \
                         na obra spinozana."
                .to_string(),
            link: "https://helius.uvanet.br/index.php/helius/article/view/260/257".to_string(),
            category: "Ontologia".to_string(),
            created_at: "2021-06-01".to_string(),
        },
        Publication {
            id: "3".to_string(),
            title: "BNCC, ensino de filosofia e a perspectiva spinozana".to_string(),
            author_id: "divino-viana".to_string(),
            author_name: "Prof. Me. Divino Viana".to_string(),
            r#abstract: "Discussão sobre o ensino de filosofia sob a ótica de Spinoza frente \
                         às novas diretrizes curriculares."
                .to_string(),
            link: "https://revistas.uece.br/index.php/kalagatos/article/view/7246/6221"
                .to_string(),
            category: "Política".to_string(),
            created_at: "2021-12-01".to_string(),
        },
        Publication {
            id: "4".to_string(),
            title: "XVI Colóquio Spinoza: Filosofia e Liberdade".to_string(),
            author_id: "divino-viana".to_string(),
            author_name: "Prof. Me. Divino Viana".to_string(),
            r#abstract: "Participação e publicação nos anais do Colóquio Spinoza da PUC-Rio."
                .to_string(),
            link: "https://spinoza.jur.puc-rio.br/wp-content/uploads/2022/02/XVI-COLOQUIO-SPINOZA-2019-FILOSOFIA-E-LIBERDADE-VOLUME-2.pdf"
                .to_string(),
            category: "Ética".to_string(),
            created_at: "2019-09-01".to_string(),
        },
    ]
}
