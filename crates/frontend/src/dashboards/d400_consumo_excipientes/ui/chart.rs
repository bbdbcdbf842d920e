//! SVG bar chart of consolidated excipient consumption.

use contracts::dashboards::d400_consumo_excipientes::dto::ConsumoExcipientes;
use leptos::prelude::*;

use crate::shared::components::table::number_format::format_qtd;

const VIEW_LARGURA: f64 = 640.0;
const VIEW_ALTURA: f64 = 400.0;
/// Top margin leaves room for the value label above the tallest bar
const MARGEM_TOPO: f64 = 24.0;
/// Bottom margin holds the excipient name labels
const MARGEM_BASE: f64 = 56.0;
const MARGEM_LATERAL: f64 = 16.0;

/// Bar color by series index, carried over from the legacy dashboard.
pub fn cor_barra(index: usize) -> String {
    format!(
        "rgb({}, {}, {})",
        (index * 50) % 255,
        (index * 100) % 255,
        (index * 150) % 255
    )
}

/// One laid-out bar, in viewBox units.
#[derive(Debug, Clone, PartialEq)]
pub struct Barra {
    pub nome: String,
    pub total: f64,
    pub x: f64,
    pub y: f64,
    pub largura: f64,
    pub altura: f64,
    pub cor: String,
}

/// Lay the aggregate out as bars inside the plot area. The tallest bar
/// fills the plot height; bar widths split the plot width evenly with a
/// 20% gap between bars.
pub fn calcular_barras(consumo: &ConsumoExcipientes) -> Vec<Barra> {
    if consumo.is_empty() {
        return Vec::new();
    }

    let plot_largura = VIEW_LARGURA - 2.0 * MARGEM_LATERAL;
    let plot_altura = VIEW_ALTURA - MARGEM_TOPO - MARGEM_BASE;

    let maior_total = consumo
        .values()
        .map(|r| r.total)
        .fold(0.0_f64, f64::max)
        .max(f64::MIN_POSITIVE);

    let n = consumo.len() as f64;
    let passo = plot_largura / n;
    let largura = passo * 0.8;

    consumo
        .iter()
        .enumerate()
        .map(|(i, (nome, resumo))| {
            let altura = (resumo.total / maior_total) * plot_altura;
            let x = MARGEM_LATERAL + (i as f64) * passo + (passo - largura) / 2.0;
            let y = MARGEM_TOPO + (plot_altura - altura);
            Barra {
                nome: nome.clone(),
                total: resumo.total,
                x,
                y,
                largura,
                altura,
                cor: cor_barra(i),
            }
        })
        .collect()
}

/// Shorten long excipient names so the axis labels stay readable.
fn abreviar(nome: &str, max: usize) -> String {
    if nome.chars().count() <= max {
        nome.to_string()
    } else {
        let curto: String = nome.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", curto)
    }
}

#[component]
pub fn ConsumoExcipientesChart(consumo: Signal<ConsumoExcipientes>) -> impl IntoView {
    view! {
        <div class="chart-panel">
            <h2 class="chart-panel__title">"Consumo de Excipientes"</h2>
            <Show
                when=move || !consumo.get().is_empty()
                fallback=|| view! {
                    <div class="chart-panel__empty">
                        <p>"Nenhuma ordem adicionada"</p>
                    </div>
                }
            >
                <svg
                    class="chart-panel__svg"
                    viewBox=format!("0 0 {} {}", VIEW_LARGURA, VIEW_ALTURA)
                    preserveAspectRatio="xMidYMid meet"
                    role="img"
                >
                    {move || {
                        calcular_barras(&consumo.get())
                            .into_iter()
                            .map(|barra| {
                                let rotulo_x = barra.x + barra.largura / 2.0;
                                let valor_y = barra.y - 6.0;
                                let nome_y = VIEW_ALTURA - MARGEM_BASE + 16.0;
                                view! {
                                    <g>
                                        <rect
                                            x=barra.x
                                            y=barra.y
                                            width=barra.largura
                                            height=barra.altura
                                            fill=barra.cor.clone()
                                            fill-opacity="0.6"
                                            stroke=barra.cor.clone()
                                            stroke-width="1"
                                        >
                                            <title>
                                                {format!("{}: {} Kg", barra.nome, format_qtd(barra.total))}
                                            </title>
                                        </rect>
                                        <text
                                            x=rotulo_x
                                            y=valor_y
                                            text-anchor="middle"
                                            class="chart-panel__valor"
                                        >
                                            {format_qtd(barra.total)}
                                        </text>
                                        <text
                                            x=rotulo_x
                                            y=nome_y
                                            text-anchor="middle"
                                            class="chart-panel__rotulo"
                                        >
                                            {abreviar(&barra.nome, 14)}
                                        </text>
                                    </g>
                                }
                            })
                            .collect_view()
                    }}
                </svg>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d400_consumo_excipientes::dto::ExcipienteResumo;

    fn consumo(entradas: &[(&str, f64)]) -> ConsumoExcipientes {
        entradas
            .iter()
            .map(|(nome, total)| {
                (
                    nome.to_string(),
                    ExcipienteResumo {
                        total: *total,
                        ordens: Vec::new(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_cor_barra() {
        assert_eq!(cor_barra(0), "rgb(0, 0, 0)");
        assert_eq!(cor_barra(1), "rgb(50, 100, 150)");
        // indexes wrap around the 255 boundary
        assert_eq!(cor_barra(6), "rgb(45, 90, 135)");
    }

    #[test]
    fn mapa_vazio_nao_gera_barras() {
        assert!(calcular_barras(&ConsumoExcipientes::new()).is_empty());
    }

    #[test]
    fn barra_mais_alta_preenche_o_plot() {
        let barras = calcular_barras(&consumo(&[("Lactose", 10.0), ("Talco", 2.5)]));
        assert_eq!(barras.len(), 2);

        let plot_altura = VIEW_ALTURA - MARGEM_TOPO - MARGEM_BASE;
        let lactose = barras.iter().find(|b| b.nome == "Lactose").unwrap();
        let talco = barras.iter().find(|b| b.nome == "Talco").unwrap();

        assert!((lactose.altura - plot_altura).abs() < 1e-9);
        assert!((talco.altura - plot_altura * 0.25).abs() < 1e-9);
        // shorter bar sits lower
        assert!(talco.y > lactose.y);
    }

    #[test]
    fn barras_tem_largura_igual_e_nao_se_sobrepoem() {
        let barras = calcular_barras(&consumo(&[("A", 1.0), ("B", 2.0), ("C", 3.0)]));
        assert!(barras.windows(2).all(|p| p[0].largura == p[1].largura));
        assert!(barras.windows(2).all(|p| p[0].x + p[0].largura < p[1].x));
    }

    #[test]
    fn test_abreviar() {
        assert_eq!(abreviar("Talco", 14), "Talco");
        assert_eq!(abreviar("Celulose Microcristalina", 14), "Celulose Micr…");
    }
}
