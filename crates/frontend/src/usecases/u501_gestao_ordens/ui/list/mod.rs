use super::details::EdicaoOrdem;
use crate::dashboards::d400_consumo_excipientes::ui::ConsumoExcipientesChart;
use crate::projections::p900_receitas::api::{self, BuscaReceita};
use crate::shared::components::table::number_format::format_qtd;
use crate::shared::export::{export_to_csv, CsvExportavel};
use crate::shared::icons::icon;
use crate::usecases::u501_gestao_ordens::state::GestaoOrdensState;
use contracts::dashboards::d400_consumo_excipientes::calculo;
use contracts::dashboards::d400_consumo_excipientes::dto::ConsumoExcipientes;
use contracts::projections::p900_receitas::dto::{ExcipienteQtd, OrdemDto};
use leptos::logging::log;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Badge, BadgeAppearance, BadgeColor, Button, ButtonAppearance, Input};

/// Aggregate table row shape used for CSV export.
struct LinhaConsumo {
    excipiente: String,
    total: f64,
}

impl CsvExportavel for LinhaConsumo {
    fn headers() -> Vec<&'static str> {
        vec!["Excipiente", "Quantidade Total (Kg)"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![self.excipiente.clone(), format_qtd(self.total)]
    }
}

fn linhas_para_exportar(consumo: &ConsumoExcipientes) -> Vec<LinhaConsumo> {
    consumo
        .iter()
        .map(|(nome, resumo)| LinhaConsumo {
            excipiente: nome.clone(),
            total: resumo.total,
        })
        .collect()
}

#[component]
pub fn GestaoOrdensPage() -> impl IntoView {
    let state = RwSignal::new(GestaoOrdensState::new());
    let codigo_input = RwSignal::new(String::new());
    let (erro, set_erro) = signal(None::<String>);
    let (adicionando, set_adicionando) = signal(false);
    // (index, codigo, nome) of the order being edited
    let (editando, set_editando) = signal(None::<(usize, String, String)>);

    // Re-derive the aggregate from the register. The token makes overlapping
    // passes safe: only the latest one may commit its result.
    let recalcular = move || {
        let ordens = state.with_untracked(|s| s.ordens.clone());
        let mut token = 0;
        state.update(|s| token = s.iniciar_recalculo());

        spawn_local(async move {
            let mut coletado: Vec<(OrdemDto, Vec<ExcipienteQtd>)> = Vec::new();
            for ordem in ordens {
                match api::excipientes_da_receita(&ordem.codigo).await {
                    Ok(linhas) => coletado.push((ordem, linhas)),
                    Err(e) => {
                        // abort the pass; the previous aggregate stays committed
                        set_erro.set(Some(format!("Falha ao atualizar somatória: {}", e)));
                        return;
                    }
                }
            }
            let consumo = calculo::consolidar(coletado.iter().map(|(o, l)| (o, l.as_slice())));
            state.update(|s| {
                s.aplicar_recalculo(token, consumo);
            });
        });
    };

    let adicionar_ordem = move || {
        let codigo = codigo_input.get_untracked().trim().to_string();
        if codigo.is_empty() {
            set_erro.set(Some("Informe o código da receita".to_string()));
            return;
        }
        set_adicionando.set(true);
        spawn_local(async move {
            match api::buscar_receita(&codigo).await {
                Ok(BuscaReceita::Encontrada(linhas)) => {
                    let nome = linhas.first().map(|l| l.ativo.clone()).unwrap_or_default();
                    state.update(|s| s.adicionar_ordem(OrdemDto::new(codigo, nome)));
                    codigo_input.set(String::new());
                    set_erro.set(None);
                    recalcular();
                }
                Ok(BuscaReceita::NaoEncontrada) => {
                    set_erro.set(Some("Receita não encontrada".to_string()));
                }
                Err(e) => set_erro.set(Some(e)),
            }
            set_adicionando.set(false);
        });
    };

    let remover_ordem = move |index: usize| {
        let mut removido = false;
        state.update(|s| removido = s.remover_ordem(index));
        if removido {
            recalcular();
        }
    };

    let exportar = move || {
        let linhas = state.with_untracked(|s| linhas_para_exportar(&s.consumo));
        if let Err(e) = export_to_csv(&linhas, "consumo_excipientes.csv") {
            log!("Failed to export: {}", e);
        }
    };

    let consumo_chart = Signal::derive(move || state.get().consumo.clone());

    view! {
        <div id="u501_gestao_ordens--page" class="page" data-page-category="usecase">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Gestão de Ordens"</h1>
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                        {move || state.get().ordens.len().to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| recalcular()
                        disabled=Signal::derive(move || state.get().ordens.is_empty())
                    >
                        {icon("refresh")}
                        " Atualizar Tabela Total"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| exportar()
                        disabled=Signal::derive(move || state.get().consumo.is_empty())
                    >
                        {icon("download")}
                        " Exportar CSV"
                    </Button>
                </div>
            </div>

            {move || erro.get().map(|e| view! {
                <div class="warning-box">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                    <button
                        class="button button--icon warning-box__close"
                        on:click=move |_| set_erro.set(None)
                    >
                        {icon("x")}
                    </button>
                </div>
            })}

            <div class="page__content page__content--split">
                <div class="page__column">
                    <div class="add-ordem">
                        <Input
                            value=codigo_input
                            placeholder="Código Receita"
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| adicionar_ordem()
                            disabled=Signal::derive(move || adicionando.get())
                        >
                            {icon("plus")}
                            {move || if adicionando.get() { " Buscando..." } else { " Adicionar Ordem" }}
                        </Button>
                    </div>

                    <h2 class="section-title">"Ordens Adicionadas"</h2>
                    <div class="table">
                        <table class="table__data table--striped">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">"Código"</th>
                                    <th class="table__header-cell">"Nome"</th>
                                    <th class="table__header-cell">"Ações"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || state.get().ordens.into_iter().enumerate().map(|(index, ordem)| {
                                    let codigo = ordem.codigo.clone();
                                    let nome = ordem.nome.clone();
                                    let codigo_edit = codigo.clone();
                                    let nome_edit = nome.clone();
                                    let editada = ordem.foi_editada();
                                    view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{codigo}</td>
                                            <td class="table__cell">
                                                {nome}
                                                {editada.then(|| view! {
                                                    " "
                                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                                        "editada"
                                                    </Badge>
                                                })}
                                            </td>
                                            <td class="table__cell table__cell--actions">
                                                <Button
                                                    appearance=ButtonAppearance::Secondary
                                                    on_click=move |_| remover_ordem(index)
                                                >
                                                    {icon("delete")}
                                                    " Remover"
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Secondary
                                                    on_click=move |_| {
                                                        set_editando.set(Some((index, codigo_edit.clone(), nome_edit.clone())));
                                                    }
                                                >
                                                    {icon("edit")}
                                                    " Editar"
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>

                    <h2 class="section-title">"Somatória de Excipientes"</h2>
                    <div class="table">
                        <table class="table__data table--striped">
                            <thead class="table__head">
                                <tr>
                                    <th class="table__header-cell">"Excipiente"</th>
                                    <th class="table__header-cell">"Quantidade Total (Kg)"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let s = state.get();
                                    let expandido = s.expandido.clone();
                                    s.consumo.iter().map(|(nome, resumo)| {
                                        let nome_linha = nome.clone();
                                        let nome_toggle = nome.clone();
                                        let aberto = expandido.as_deref() == Some(nome.as_str());
                                        let contribuicoes = resumo.ordens.clone();
                                        view! {
                                            <tr
                                                class="table__row table__row--clickable"
                                                on:click=move |_| state.update(|s| s.alternar_expansao(&nome_toggle))
                                            >
                                                <td class="table__cell">
                                                    {if aberto { icon("chevron-down") } else { icon("chevron-right") }}
                                                    " "
                                                    {nome_linha.clone()}
                                                </td>
                                                <td class="table__cell">{format!("{} Kg", format_qtd(resumo.total))}</td>
                                            </tr>
                                            {aberto.then(|| view! {
                                                <tr class="table__row table__row--drilldown">
                                                    <td class="table__cell" colspan="2">
                                                        <table class="table__data table__data--nested">
                                                            <thead>
                                                                <tr>
                                                                    <th class="table__header-cell">"Código Ordem"</th>
                                                                    <th class="table__header-cell">"Nome Ativo"</th>
                                                                    <th class="table__header-cell">"Quantidade (Kg)"</th>
                                                                </tr>
                                                            </thead>
                                                            <tbody>
                                                                {contribuicoes.iter().map(|c| view! {
                                                                    <tr>
                                                                        <td class="table__cell">{c.codigo.clone()}</td>
                                                                        <td class="table__cell">{c.nome.clone()}</td>
                                                                        <td class="table__cell">{format!("{} Kg", format_qtd(c.quantidade))}</td>
                                                                    </tr>
                                                                }).collect_view()}
                                                            </tbody>
                                                        </table>
                                                    </td>
                                                </tr>
                                            })}
                                        }
                                    }).collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>

                <div class="page__column">
                    <ConsumoExcipientesChart consumo=consumo_chart />
                </div>
            </div>

            {move || editando.get().map(|(index, codigo, nome)| {
                view! {
                    <EdicaoOrdem
                        codigo=codigo
                        nome=nome
                        on_saved=Callback::new(move |snapshot| {
                            // an edit attaches a snapshot to the order; the
                            // displayed aggregate only changes on refresh
                            state.update(|s| {
                                s.salvar_edicao(index, snapshot);
                            });
                            set_editando.set(None);
                        })
                        on_cancel=Callback::new(move |_| set_editando.set(None))
                    />
                }
            })}
        </div>
    }
}
