//! Account table used by the posting engine.

use racun_shared::config::{AccountRef, PostingConfig};

use crate::document::{DocumentType, ItemType};

/// Which accounts each part of a document posts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostingRules {
    /// Receivable for regular invoices and corrections.
    pub receivable: AccountRef,
    /// Receivable for advance-payment invoices.
    pub advance_receivable: AccountRef,
    /// Output VAT.
    pub output_tax: AccountRef,
    /// Revenue for goods.
    pub revenue_goods: AccountRef,
    /// Revenue for own products.
    pub revenue_product: AccountRef,
    /// Revenue for services.
    pub revenue_service: AccountRef,
}

impl Default for PostingRules {
    fn default() -> Self {
        Self::from_config(&PostingConfig::default())
    }
}

impl PostingRules {
    /// Builds the rules from configuration.
    #[must_use]
    pub fn from_config(config: &PostingConfig) -> Self {
        Self {
            receivable: config.receivable.clone(),
            advance_receivable: config.advance_receivable.clone(),
            output_tax: config.output_tax.clone(),
            revenue_goods: config.revenue_goods.clone(),
            revenue_product: config.revenue_product.clone(),
            revenue_service: config.revenue_service.clone(),
        }
    }

    /// Receivable account for a document type.
    #[must_use]
    pub fn receivable_for(&self, document_type: DocumentType) -> &AccountRef {
        match document_type {
            DocumentType::Advance => &self.advance_receivable,
            DocumentType::Regular | DocumentType::CreditNote | DocumentType::DebitNote => {
                &self.receivable
            }
        }
    }

    /// Revenue account for an item classification.
    #[must_use]
    pub fn revenue_for(&self, item_type: ItemType) -> &AccountRef {
        match item_type {
            ItemType::Goods => &self.revenue_goods,
            ItemType::Product => &self.revenue_product,
            ItemType::Service => &self.revenue_service,
        }
    }
}
